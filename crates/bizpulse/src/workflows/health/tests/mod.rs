mod common;
mod plan;
mod routing;
mod service;
