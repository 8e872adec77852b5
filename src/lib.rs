//! Preview how mixin injection annotations rewrite JVM classes
//!
//! Given an already-parsed target class, mixin class, and the injection
//! annotations attached to the mixin's methods, [`inject`] mutates the
//! target class in place into the code a real injection framework would
//! produce - close enough for a human to read, without running the
//! framework. [`jvm`] holds the class/method/instruction model everything
//! operates on.
//!
//! Parsing class files into the model and serializing the rewritten class
//! back out are deliberately not part of this crate.

pub mod inject;
pub mod jvm;
