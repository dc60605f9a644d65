pub mod appointment;

pub use appointment::{
    AppointmentDetails, AppointmentRequest, AppointmentResult, AuthStatus, GuestInfo, TimeSlot,
};
