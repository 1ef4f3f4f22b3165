pub mod orchestration;

pub use orchestration::{
    build_descriptor, resolve_with, run_plan, run_resolve, ResolveArgs, Resolution,
};
