pub mod pagination;
pub mod view_state;
