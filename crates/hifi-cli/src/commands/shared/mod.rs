pub mod ack;
pub mod jsonl;
pub mod limit;
pub mod parse;

#[cfg(test)]
pub mod fixtures;
