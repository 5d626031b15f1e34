//! # Ports Layer
//!
//! - **Inbound (Driving)**: the control surface called by the HTTP front-end
//!
//! The outbound dependency, document verification, is the
//! `SignatureVerificationApi` port of `sa-02-signature-verification`.

pub mod inbound;
