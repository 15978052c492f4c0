mod package;

pub use package::package;
