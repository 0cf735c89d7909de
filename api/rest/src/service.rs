pub mod info;
pub mod module;
pub mod record;
pub mod root;
pub mod search;
pub mod workflow;
