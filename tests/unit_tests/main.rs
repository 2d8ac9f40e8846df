mod application;
mod helpers;
