pub mod use_list_input;
pub mod use_random;
