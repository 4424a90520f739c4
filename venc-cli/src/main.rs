// A dry-run tool for the venc crate: it runs the encoder register sequences
// against the fake register file and prints every access, which is handy
// for comparing against a register dump from real hardware.

use clap::{Parser, Subcommand};
use std::convert::TryFrom;
use venc::interface::fake;
use venc::registers::Register;
use venc::{CeaTimings, EncoderIndex, Interface, Venc, Vic};

#[derive(Parser)]
#[clap(about = "Print the register accesses for an encoder configuration")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Configure ENCP for a progressive or 1080i format
    Progressive {
        vic: u8,
        /// Encoder instance, 0 to 2
        #[clap(long, default_value_t = 0)]
        encoder: u32,
    },
    /// Configure ENCI for a standard-definition interlaced format
    Interlaced {
        vic: u8,
        #[clap(long, default_value_t = 0)]
        encoder: u32,
    },
    /// Enable one of the encoders
    Enable {
        /// Enable ENCP rather than ENCI
        #[clap(long)]
        progressive: bool,
    },
    /// Disable both encoders
    Disable,
    /// List the built-in timings
    Timings,
}

/// Wraps another interface, printing each access before passing it on.
struct Tracing<I: Interface> {
    inner: I,
}

impl<I: Interface> Interface for Tracing<I> {
    type Error = I::Error;

    fn read(&mut self, reg: Register) -> Result<u32, Self::Error> {
        let v = self.inner.read(reg)?;
        println!("rd {:<28} {:#06x} -> {:#010x}", format!("{:?}", reg), reg.number(), v);
        Ok(v)
    }

    fn write(&mut self, reg: Register, v: u32) -> Result<(), Self::Error> {
        println!("wr {:<28} {:#06x} <- {:#010x}", format!("{:?}", reg), reg.number(), v);
        self.inner.write(reg, v)
    }
}

fn encoder_index(n: u32) -> Result<EncoderIndex, String> {
    EncoderIndex::try_from(n).map_err(|n| format!("no encoder instance {}", n))
}

fn print_timings() {
    println!(" VIC  h total/active  v total/active  pixel kHz  field/frame Hz  rep");
    for t in CeaTimings::all() {
        println!(
            "{:>4}  {:>5} / {:<5}   {:>5} / {:<5}   {:>9}  {:>7}.{:03}{}  {:>3}",
            t.vic.0,
            t.h.total,
            t.h.active,
            t.v.total,
            t.v.active,
            t.pixel_freq_khz,
            t.refresh_millihz() / 1000,
            t.refresh_millihz() % 1000,
            if t.interlaced { "i" } else { "p" },
            t.pixel_repeat,
        );
    }
}

fn run(command: Command, regs: &mut [u32]) -> Result<(), String> {
    let ei = Tracing {
        inner: fake::Interface::new(regs),
    };
    let mut venc = Venc::new(ei);
    let result = match command {
        Command::Progressive { vic, encoder } => {
            venc.configure_progressive_encoder(encoder_index(encoder)?, Vic(vic), true)
        }
        Command::Interlaced { vic, encoder } => {
            venc.configure_interlaced_encoder(encoder_index(encoder)?, Vic(vic), true)
        }
        Command::Enable { progressive } => venc.set_encoder_enable(true, progressive),
        Command::Disable => venc.set_encoder_enable(false, false),
        Command::Timings => {
            print_timings();
            Ok(())
        }
    };
    result.map_err(|err| err.to_string())
}

fn print_registers(regs: &[u32]) {
    let first = Register::FIRST.number() as u16;
    let last = Register::LAST.number() as u16;
    for n in first..=last {
        if let Ok(reg) = Register::try_from(n) {
            let v = regs[reg.index()];
            if v != 0 {
                println!("{:<31} {:#06x} = {:#010x} ({})", format!("{:?}", reg), n, v, v);
            }
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let print_state = !matches!(cli.command, Command::Timings);

    let mut regs = vec![0u32; Register::FILE_LEN];
    log::debug!(
        "fake register file covers {:#06x}..={:#06x}",
        Register::FIRST.number(),
        Register::LAST.number()
    );
    if let Err(msg) = run(cli.command, &mut regs[..]) {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    }

    if print_state {
        println!();
        print_registers(&regs);
    }
}
