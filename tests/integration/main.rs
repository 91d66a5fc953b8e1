//! Integration test entry point.

mod helpers;

mod hooks_test;
mod inspector_test;
mod rpc_test;
mod tabs_test;
