//! Workspace root package. It carries the development tooling (the
//! `rusty-hook` pre-commit hook); the code lives under `crates/`.
