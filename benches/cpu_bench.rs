// CPU benchmarks
//
// Measures dispatch and execution cost of common instruction patterns
// through the batched clock.

use criterion::{criterion_group, criterion_main, Criterion};
use famicore::{Cpu, CpuBus};
use std::hint::black_box;

/// A CPU spinning on `program` placed at $0200 with a JMP back to the top
fn looping_cpu(program: &[u8]) -> Cpu {
    let mut cpu = Cpu::new(CpuBus::new());
    let mut address = 0x0200u16;
    for byte in program {
        cpu.bus_mut().write(address, *byte).unwrap();
        address += 1;
    }
    // JMP $0200
    cpu.bus_mut().write(address, 0x4C).unwrap();
    cpu.bus_mut().write(address + 1, 0x00).unwrap();
    cpu.bus_mut().write(address + 2, 0x02).unwrap();

    cpu.pc = 0x0200;
    cpu
}

/// Benchmark individual instruction patterns
fn bench_cpu_instructions(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_instructions");

    group.bench_function("nop", |b| {
        let mut cpu = looping_cpu(&[0xEA]);
        b.iter(|| black_box(&mut cpu).clock().unwrap());
    });

    group.bench_function("lda_immediate", |b| {
        let mut cpu = looping_cpu(&[0xA9, 0x42]);
        b.iter(|| black_box(&mut cpu).clock().unwrap());
    });

    group.bench_function("adc_immediate", |b| {
        let mut cpu = looping_cpu(&[0x69, 0x01]);
        b.iter(|| black_box(&mut cpu).clock().unwrap());
    });

    group.bench_function("sta_absolute", |b| {
        let mut cpu = looping_cpu(&[0x8D, 0x00, 0x03]);
        b.iter(|| black_box(&mut cpu).clock().unwrap());
    });

    group.bench_function("jmp_absolute", |b| {
        let mut cpu = looping_cpu(&[]);
        b.iter(|| black_box(&mut cpu).clock().unwrap());
    });

    group.finish();
}

/// Benchmark a realistic mixed sequence: a counting loop
fn bench_instruction_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("instruction_sequences");

    group.bench_function("counting_loop", |b| {
        // LDX #$05 / DEX / BNE -1 / LDA #$00 / STA $0300, then back
        let mut cpu = looping_cpu(&[
            0xA2, 0x05, // LDX #$05
            0xCA, // DEX
            0xD0, 0xFD, // BNE back to DEX
            0xA9, 0x00, // LDA #$00
            0x8D, 0x00, 0x03, // STA $0300
        ]);

        b.iter(|| {
            for _ in 0..64 {
                black_box(&mut cpu).clock().unwrap();
            }
        });
    });

    group.finish();
}

/// Benchmark sustained execution at frame granularity
fn bench_frame_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_execution");
    group.sample_size(20);

    group.bench_function("29780_cycles_one_frame", |b| {
        let mut cpu = looping_cpu(&[0xEA]);

        b.iter(|| {
            // ~1.79 MHz at 60 FPS is 29,780 CPU cycles per frame
            let start = cpu.cycle_count();
            while cpu.cycle_count() - start < 29_780 {
                black_box(&mut cpu).clock().unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cpu_instructions,
    bench_instruction_sequence,
    bench_frame_execution
);
criterion_main!(benches);
