mod profile;

pub use profile::{Intent, IntentFilter, NewProfile, Profile};
