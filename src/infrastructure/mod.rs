pub mod memory_repo;
pub mod sqlite_repo;

#[cfg(test)]
mod repo_tests;
