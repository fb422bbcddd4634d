mod animator;
mod data;
mod field;
mod graphics;
mod math;
mod modes;

/// Per-frame render callback: the program state and the current
/// timestamp in milliseconds since program start.
pub(crate) type RenderFunc = fn(&mut data::Program, f64);

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let prog = data::Program::new().eval_args(&mut args.iter());

    modes::windowed_mode::winit_main(prog);
}
