mod assembler;
mod batch;

pub use assembler::{FocusPackAssembler, assemble_focus_pack};
pub use batch::{assemble_all_horizons, assemble_horizons};
