pub mod candidate;
pub mod market;
pub mod outlook;
pub mod profile;
pub mod recommendation;
pub mod season;

pub use candidate::*;
pub use market::*;
pub use outlook::*;
pub use profile::*;
pub use recommendation::*;
pub use season::*;
