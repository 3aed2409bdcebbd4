//! bytemarshal - latency report
//!
//! Menjalankan micro-benchmark untuk:
//! - Scalar Codec: fixed-width encode/decode
//! - Structure Marshal: record staging lewat scratch buffer
//! - Hex: byte array <-> text
//!
//! Usage: cargo run --release [-- config.toml]

use std::time::Instant;

use bytemarshal::codec::{self, bytes_to_hex, hex_to_bytes};
use bytemarshal::{Field, FieldReader, FieldWriter, Marshal, MarshalConfig, Record, Result};
use log::{error, info};

/// Snapshot of a tracked entity, the kind of record sent every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
struct EntityState {
    id: u32,
    sequence: u64,
    position: [f32; 3],
    health: i16,
    visible: bool,
}

impl Record for EntityState {
    const FIELDS: &'static [Field] = &[
        Field::u32("id"),
        Field::u64("sequence"),
        Field::f32("x"),
        Field::f32("y"),
        Field::f32("z"),
        Field::i16("health"),
        Field::bool("visible"),
    ];

    fn write_fields(&self, out: &mut FieldWriter<'_>) -> Result<()> {
        out.put(self.id)?;
        out.put(self.sequence)?;
        for axis in self.position {
            out.put(axis)?;
        }
        out.put(self.health)?;
        out.put(self.visible)
    }

    fn read_fields(input: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            id: input.get()?,
            sequence: input.get()?,
            position: [input.get()?, input.get()?, input.get()?],
            health: input.get()?,
            visible: input.get()?,
        })
    }
}

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match MarshalConfig::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => MarshalConfig::default(),
    };
    info!("using {config:?}");

    println!("bytemarshal - latency report");
    println!("============================\n");

    if let Err(e) = run(&config) {
        error!("benchmark aborted: {e}");
        std::process::exit(1);
    }

    println!("\nAll benchmarks complete!");
}

fn run(config: &MarshalConfig) -> Result<()> {
    benchmark_scalars()?;
    benchmark_marshal(config)?;
    benchmark_hex()?;
    Ok(())
}

fn report(label: &str, iterations: usize, elapsed_ns: u128) {
    let per_op = elapsed_ns as f64 / iterations as f64;
    println!(
        "  {label:<18} {per_op:>8.2} ns/op ({:.2} M ops/sec)",
        1_000.0 / per_op
    );
}

fn benchmark_scalars() -> Result<()> {
    println!("Scalar Codec (little-endian, checked)");
    println!("-------------------------------------");

    const ITERATIONS: usize = 1_000_000;
    let mut buffer = [0u8; 64];

    let start = Instant::now();
    for i in 0..ITERATIONS {
        codec::get_bytes_into(i as u64, &mut buffer, (i % 7) * 8)?;
    }
    report("write u64", ITERATIONS, start.elapsed().as_nanos());

    let start = Instant::now();
    let mut checksum = 0u64;
    for i in 0..ITERATIONS {
        checksum = checksum.wrapping_add(codec::get_uint64_at(&buffer, (i % 7) * 8)?);
    }
    report("read u64", ITERATIONS, start.elapsed().as_nanos());

    let start = Instant::now();
    for i in 0..ITERATIONS {
        codec::get_bytes_into(i as f64 * 0.5, &mut buffer, 0)?;
        checksum = checksum.wrapping_add(codec::get_double(&buffer)?.to_bits());
    }
    report("f64 round trip", ITERATIONS, start.elapsed().as_nanos());

    println!("  (checksum {checksum:#x})\n");
    Ok(())
}

fn benchmark_marshal(config: &MarshalConfig) -> Result<()> {
    println!("Structure Marshal ({}-byte record)", EntityState::width());
    println!("----------------------------------");

    const ITERATIONS: usize = 500_000;
    let mut marshal = Marshal::with_config(config);
    let mut frame = vec![0u8; EntityState::width() * 16];
    let mut state = EntityState {
        id: 7,
        sequence: 0,
        position: [1.0, 2.0, 3.0],
        health: 100,
        visible: true,
    };

    let start = Instant::now();
    for i in 0..ITERATIONS {
        state.sequence = i as u64;
        let slot = (i % 16) * EntityState::width();
        marshal.structure_to_bytes_into(&state, &mut frame, slot)?;
    }
    report("encode into frame", ITERATIONS, start.elapsed().as_nanos());

    let start = Instant::now();
    for i in 0..ITERATIONS {
        let slot = (i % 16) * EntityState::width();
        let decoded: EntityState = marshal.bytes_to_structure_at(&frame, slot)?;
        state.health = decoded.health;
    }
    report("decode from frame", ITERATIONS, start.elapsed().as_nanos());

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let bytes = marshal.structure_to_bytes(&state)?;
        std::hint::black_box(bytes);
    }
    report("encode to Vec", ITERATIONS, start.elapsed().as_nanos());

    println!("  Scratch capacity: {} bytes\n", marshal.capacity());
    marshal.release();
    Ok(())
}

fn benchmark_hex() -> Result<()> {
    println!("Hex (64-byte payload)");
    println!("---------------------");

    const ITERATIONS: usize = 200_000;
    let payload: Vec<u8> = (0..64u8).collect();

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let text = bytes_to_hex(&payload);
        let bytes = hex_to_bytes(&text)?;
        std::hint::black_box(bytes);
    }
    report("hex round trip", ITERATIONS, start.elapsed().as_nanos());
    Ok(())
}
