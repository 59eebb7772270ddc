mod algorithm;
mod evaluation;
mod hyperparams;
mod iter;
mod leaf;

pub use algorithm::*;
pub use evaluation::*;
pub use hyperparams::*;
pub use iter::*;
pub use leaf::*;
