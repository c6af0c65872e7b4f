mod home;
mod register;
