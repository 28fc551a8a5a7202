//! Build one OSC message from command-line tokens and send it once.

pub mod error;
pub mod general;
pub mod io;
pub mod remote;

pub use error::{ConversionError, OscSendError};
pub use general::cast::{cast, TypeTag, TypedArgument};
pub use general::infer::infer;
pub use general::logging::LogConfig;
pub use general::message::{assemble, Message};
pub use remote::osc_sender::{DatagramSink, Destination, Protocol, SendJob, SendReport, UdpSink};
pub use remote::scheduler::Scheduler;
