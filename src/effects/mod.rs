pub mod fade;
pub mod quake;
pub mod shout;
