//! End-to-end tests for AuthWatch live under `tests/`.
