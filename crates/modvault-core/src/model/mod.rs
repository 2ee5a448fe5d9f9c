pub mod directory;
pub mod license;
pub mod module;
pub mod package;

pub use directory::{Directory, DirectoryPackage, Documentation, Readme};
pub use license::{license_pairs, License, LicenseInfo};
pub use module::Module;
pub use package::Package;
