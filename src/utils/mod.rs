pub mod overlap;
pub mod pricing;
pub mod reference;
