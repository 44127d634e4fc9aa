pub mod setting_repo;

pub use setting_repo::SettingRepo;
