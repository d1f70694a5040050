pub mod configuration;

pub mod holiday {
    pub mod region;
    pub mod holidayrecord;
}

pub mod loader {
    pub mod loadererror;
    pub mod artifactsource;
    pub mod holidayloader;
    pub mod hongkongloader;
    pub mod mainlandloader;
}

pub mod service {
    pub mod cachebackend;
    pub mod holidayservice;
}

pub mod time {
    pub mod utility;
}

pub mod view {
    pub mod localization;
    pub mod daysuntil;
    pub mod holidaylistmodel;
    pub mod monthgridmodel;
}
