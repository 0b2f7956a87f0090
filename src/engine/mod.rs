// Engine modules: timestep, input, physics, sprite visuals

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod visual;
