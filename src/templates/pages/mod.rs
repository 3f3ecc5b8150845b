pub mod estimate_form;
pub mod login;
pub mod notes_form;
pub mod repair_form;
pub mod repairs;
pub mod send;
pub mod stats;
