//! Core library for summaryai
//!
//! This crate is the **Functional Core** of summaryai: every rule about what
//! gets sent to the model and how its answer is read lives here, with zero I/O.
//!
//! - **`summaryai_core`** (this crate): prompt construction, wire types, reply
//!   interpretation and the error taxonomy
//! - **`summaryai`**: configuration, terminal host, HTTP transport and the
//!   orchestrator (the Imperative Shell)
//!
//! # Module Organization
//!
//! - [`doc_type`]: the four documentation formats offered to the user
//! - [`prompt`]: the fixed system prompt and user-query interpolation
//! - [`gemini`]: request/response types and pure reply interpretation
//! - [`error`]: the error taxonomy shared with the shell
//!
//! # Example Usage
//!
//! ```rust
//! use summaryai_core::doc_type::DocType;
//! use summaryai_core::gemini::{build_request, interpret_reply, HttpReply};
//!
//! let request = build_request(DocType::CommitMessage, "fix: typo in README");
//! assert_eq!(request.contents.len(), 1);
//!
//! let reply = HttpReply {
//!     status: 200,
//!     status_text: "OK".to_string(),
//!     body: r#"{"candidates":[{"content":{"parts":[{"text":"docs: fix typo"}]}}]}"#.to_string(),
//! };
//! assert_eq!(interpret_reply(&reply).unwrap(), "docs: fix typo");
//! ```

pub mod doc_type;
pub mod error;
pub mod gemini;
pub mod prompt;
