mod common;
mod validation;
mod view;
