//! Walks a ring through bulk and direct operations and prints its state.
//!
//! Run with: cargo run --features cli --bin ringdemo -- --size 17 --power-of-two

use anyhow::{bail, ensure, Context, Result};
use bytering::{Exact, PowerOfTwo, RingBuffer, Sizing};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SENTINEL: u8 = b'X';

#[derive(Parser)]
#[command(name = "ringdemo", about = "Exercise a fixed-capacity byte ring", version)]
struct Cli {
    /// Requested ring size in bytes
    #[arg(long, default_value_t = 17)]
    size: usize,

    /// Round the size down to a power of two
    #[arg(long)]
    power_of_two: bool,

    /// Length of the pseudo-random stream pumped through the ring
    #[arg(long, default_value_t = 1351)]
    stream_len: usize,

    /// Seed for the stream generator
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if cli.power_of_two {
        run::<PowerOfTwo>(&cli)
    } else {
        run::<Exact>(&cli)
    }
}

fn run<S: Sizing>(cli: &Cli) -> Result<()> {
    // One byte past the requested size is never handed to the ring.
    let mut space = vec![SENTINEL; cli.size + 1];

    {
        let (ring_space, _) = space.split_at_mut(cli.size);
        let mut rb = RingBuffer::<S>::with_buffer(ring_space, cli.size)
            .context("failed to create ring")?;
        info!(sizing = rb.sizing(), "ring ready");
        println!("Rounded {} down to {}", cli.size, rb.capacity());
        print_spaces(&rb);

        let text = b"0123456789A";
        let window = rb.add_direct(text.len());
        let n = window.len();
        window.copy_from_slice(&text[..n]);
        println!("\nDirect write: {} of {}", n, text.len());
        print_spaces(&rb);

        let text = b"BCDEFGH";
        let n = rb.add(text);
        println!("\nWrite: {} of {}", n, text.len());
        print_spaces(&rb);

        let readable = rb.get_direct(cli.size / 2);
        println!("\nDirect read {}: '{}'", readable.len(), String::from_utf8_lossy(readable));

        let text = b"KZ";
        let n = rb.add(text);
        println!("Write: {} of {}", n, text.len());
        print_spaces(&rb);

        let mut out = vec![0u8; cli.size];
        let n = rb.get(&mut out);
        println!("\nRead {}: '{}'", n, String::from_utf8_lossy(&out[..n]));
        print_spaces(&rb);

        rb.clear();
        pump_stream(&mut rb, cli.stream_len, cli.seed)?;
    }

    if space[cli.size] != SENTINEL {
        bail!("sentinel past the ring storage was overwritten");
    }
    println!("\nEnded correctly");
    Ok(())
}

fn print_spaces<S: Sizing>(rb: &RingBuffer<'_, S>) {
    println!(
        "Free space: {}. Full space: {}",
        rb.free_space(),
        rb.full_space()
    );
    println!(
        "Free linear space: {}. Full linear space: {}",
        rb.free_linear_space(),
        rb.full_linear_space()
    );
}

/// Pushes a random stream through the ring in uneven chunks and checks it
/// comes out unchanged.
fn pump_stream<S: Sizing>(rb: &mut RingBuffer<'_, S>, len: usize, seed: u64) -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let src: Vec<u8> = (0..len).map(|_| rng.alphanumeric() as u8).collect();
    let mut dst = vec![0u8; len];

    let (mut written, mut read) = (0, 0);
    while read < len {
        if written < len {
            let chunk = rng.usize(1..=rb.capacity()).min(len - written);
            written += rb.add(&src[written..written + chunk]);
        }
        let want = (rb.full_space() / 2 + 1).min(len - read);
        read += rb.get(&mut dst[read..read + want]);
    }

    ensure!(src == dst, "stream of {} bytes did not round-trip", len);
    println!("\nStreamed {} bytes through {} slots", len, rb.capacity());
    Ok(())
}
