mod commands;
mod interactive;
mod server;
mod unit_systems;
