pub mod candidate_list;
pub mod footer;
pub mod preview;
pub mod query_input;
