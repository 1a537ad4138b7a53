mod lifecycle;
mod pagination;
mod preference;
mod setup;
