// Game-specific logic: characters, facing, movement and weapons

pub mod characters;
