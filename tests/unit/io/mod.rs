mod configuration;
mod provider;
