pub mod stdio;
pub mod streamable_http;
