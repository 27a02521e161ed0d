// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits describing what an evaluation
// is made of: predictions, acceptable answers, and the
// abstractions the other layers implement.
//
// Rules for this layer:
//   - NO file I/O
//   - NO printing or logging
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// A single model-generated answer
pub mod prediction;

// The set of acceptable answers for one example
pub mod answer;

// Core abstractions (traits) that other layers implement
pub mod traits;
