pub(crate) mod baby_kids;
pub(crate) mod electronics;
pub(crate) mod fashion;
pub(crate) mod generic;
pub(crate) mod home;
pub(crate) mod job;
pub(crate) mod pets;
pub(crate) mod property;
pub(crate) mod services;
pub(crate) mod sports;
pub(crate) mod vehicle;
