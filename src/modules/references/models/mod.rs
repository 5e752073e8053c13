mod reference;

pub use reference::{
    is_blank, ReferencePair, ScheduleDescriptor, ScheduleQuery, SerialCandidate,
};
