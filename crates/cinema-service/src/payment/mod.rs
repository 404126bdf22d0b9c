//! Payment authorization behind a gateway seam.
//!
//! Only a simulator is provided. It validates card input by format and
//! returns a synthetic authorization; nothing is settled.

pub mod card;
pub mod gateway;
pub mod simulator;

pub use gateway::{PaymentGateway, PaymentInfo, PaymentMethod, PaymentResult};
pub use simulator::SimulatedGateway;
