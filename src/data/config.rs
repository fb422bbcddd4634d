use crate::data::*;
use crate::{alert, error, info};

impl Program {
    pub fn eval_args(mut self, args: &mut dyn Iterator<Item = &String>) -> Self {
        let mut size = (DEFAULT_WIN_W, DEFAULT_WIN_H);
        let mut milli_hz: Option<u32> = None;
        let mut background: Option<u32> = None;

        let mut args = args.peekable();
        args.next();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--quiet" => self.quiet = true,

                "--size" => {
                    let s = args
                        .next()
                        .expect("Argument error: Expected value for size.")
                        .split('x')
                        .map(|x| x.parse::<u16>().expect("Argument error: Invalid value"))
                        .collect::<Vec<_>>();

                    size = (s[0], s[1]);
                }

                "--fps" => {
                    let rate = args
                        .next()
                        .expect("Argument error: Expected value for refresh rate.");

                    let milli = match rate.as_str() {
                        "inf" => u32::MAX,

                        _ => {
                            let rate =
                                rate.parse::<f32>().expect("Argument error: Invalid value.");

                            if rate < 0.0 {
                                panic!("...What?");
                            }

                            (rate * 1000.0) as u32
                        }
                    };

                    milli_hz = Some(milli);
                }

                "--density" => {
                    let px = args
                        .next()
                        .expect("Argument error: Expected pixels-per-bubble value.")
                        .parse::<f32>()
                        .expect("Argument error: Invalid value.");

                    if !(px > 0.0) {
                        panic!("Argument error: density must be positive.");
                    }

                    self.density = px;
                }

                "--background" => {
                    let mut color = [0xFFu8, 0, 0, 0];

                    for (channel_name, channel) in ["red", "green", "blue"]
                        .iter()
                        .zip(color.iter_mut().skip(1))
                    {
                        match args.next() {
                            Some(string) => {
                                *channel = string.parse::<u8>().unwrap_or_else(|_| {
                                    panic!("Invalid value for {}", channel_name)
                                })
                            }
                            None => panic!("Expected value for {}", channel_name),
                        }
                    }

                    background = Some(u32::from_be_bytes(color));
                }

                &_ => error!("Argument error: Unknown option {}", arg),
            }
        }

        if self.quiet {
            log::set_log_enabled(false);
        }

        self.window_props = WindowProps {
            width: size.0,
            height: size.1,
        };

        if let Some(m) = milli_hz {
            self.milli_hz = m;
        }

        if let Some(bg) = background {
            self.pix.set_background(bg);
        }

        self
    }

    pub fn print_startup_info(&self) {
        let mut string_out = String::new();

        string_out += "Welcome to Bubblevis!\n";
        string_out += "Startup configurations (may change):\n";

        string_out += &format!("Refresh rate: {}hz\n", self.milli_hz as f32 / 1000.0);
        string_out += &format!("Bubble budget: one per {} viewport pixels\n", self.density);

        info!("{}", string_out);

        let w = self.window_props.width as u32;
        let h = self.window_props.height as u32;

        if w * h > 2_100_000 {
            alert!(
                "Bubblevis renders on the CPU, it is not advised \
                to run it at a large size."
            );
        }
    }
}
