//! VFS Descriptor Module
//!
//! Loading of virtual filesystem descriptors: XML files, host directory
//! imports, and the built-in default layout.

pub mod loader;
pub mod xml;

pub use loader::{default_layout, import_host_dir, load, load_xml_str, VfsError};
