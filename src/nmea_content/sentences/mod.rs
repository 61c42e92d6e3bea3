//! Built-in decoders, one per sentence type.
//!
//! Every decoder turns the fields of its sentence into a typed value and raises it through an
//! [`Event`](crate::Event). The value can also be obtained without an event through the
//! decoder's associated `parse` function.

mod gga;
mod gll;
mod gsa;
mod gsv;
mod rmc;
mod vtg;
mod zda;

pub use gga::GgaDecoder;
pub use gll::GllDecoder;
pub use gsa::{ActiveSatellites, GsaDecoder};
pub use gsv::{GsvDecoder, GsvMessage, SatellitesInView};
pub use rmc::RmcDecoder;
pub use vtg::{CourseOverGround, VtgDecoder};
pub use zda::{DateAndTime, ZdaDecoder};
