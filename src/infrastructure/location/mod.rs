mod static_location_directory;

pub use static_location_directory::StaticLocationDirectory;
