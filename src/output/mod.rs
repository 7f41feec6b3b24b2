// Output formatting — line protocol for hosts and terminal display for people.

pub mod protocol;
pub mod terminal;
