//! Prelude module - common imports for cellgraph users
//!
//! ```rust
//! use cellgraph::prelude::*;
//! ```

pub use crate::{
    // Main types
    CellRef,
    Content,
    Sheet,
    SheetOptions,

    // Addressing
    Position,
    Size,

    // Values
    ArithmeticError,
    Value,

    // Error types
    Error,
    Result,
};
