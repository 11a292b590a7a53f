//! Table and JSON output.

use anyhow::Result;
use serde::Serialize;
use ynet_core::{C64, NodeAdmittanceMatrix};
use ynet_solver::{SParameterMatrix, magnitude_db};

/// `[re, im]`, the JSON form of a complex value.
type Pair = [f64; 2];

fn pair(z: C64) -> Pair {
    [z.re, z.im]
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Magnitude (linear or dB) and phase in degrees, column-aligned.
fn polar(z: C64, db: bool) -> String {
    let mag = if db {
        magnitude_db([z])[0]
    } else {
        z.norm()
    };
    format!("{:>11.5} {:>8.2}", mag, z.arg().to_degrees())
}

fn rect(z: C64) -> String {
    format!("{:>12.5e} {:>+12.5e}j", z.re, z.im)
}

#[derive(Serialize)]
struct SParamRow {
    frequency: f64,
    s11: Pair,
    s12: Pair,
    s21: Pair,
    s22: Pair,
}

/// Print S-parameters as magnitude/phase pairs.
pub fn print_s_parameters(s: &[SParameterMatrix], db: bool, json: bool) -> Result<()> {
    if json {
        let rows: Vec<SParamRow> = s
            .iter()
            .map(|m| SParamRow {
                frequency: m.frequency,
                s11: pair(m.s11()),
                s12: pair(m.s12()),
                s21: pair(m.s21()),
                s22: pair(m.s22()),
            })
            .collect();
        return print_json(&rows);
    }

    let Some(first) = s.first() else {
        println!("No frequencies.");
        return Ok(());
    };
    let unit = if db { "dB" } else { "mag" };
    println!(
        "S-parameters, ports ({}, {}), z0 = {} Ω",
        first.n1, first.n2, first.z0
    );
    println!(
        "{:>14} {:>20} {:>20} {:>20} {:>20}",
        "freq", "S11", "S21", "S12", "S22"
    );
    println!(
        "{:>14} {:>20} {:>20} {:>20} {:>20}",
        "",
        format!("{unit} / deg"),
        format!("{unit} / deg"),
        format!("{unit} / deg"),
        format!("{unit} / deg")
    );
    for m in s {
        println!(
            "{:>14.6e} {} {} {} {}",
            m.frequency,
            polar(m.s11(), db),
            polar(m.s21(), db),
            polar(m.s12(), db),
            polar(m.s22(), db)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct GainRow {
    frequency: f64,
    voltage_gain: Pair,
    network_transfer: Pair,
    network_gain: f64,
}

/// Print open-circuit voltage gain and terminated transfer in dB / degrees.
pub fn print_gains(frequencies: &[f64], av: &[C64], h: &[C64], json: bool) -> Result<()> {
    if json {
        let rows: Vec<GainRow> = frequencies
            .iter()
            .zip(av.iter().zip(h))
            .map(|(&frequency, (&av, &h))| GainRow {
                frequency,
                voltage_gain: pair(av),
                network_transfer: pair(h),
                network_gain: h.norm(),
            })
            .collect();
        return print_json(&rows);
    }

    println!(
        "{:>14} {:>20} {:>20}",
        "freq", "V2/V1 dB / deg", "V2/Vs dB / deg"
    );
    for (f, (&av, &h)) in frequencies.iter().zip(av.iter().zip(h)) {
        println!("{:>14.6e} {} {}", f, polar(av, true), polar(h, true));
    }
    Ok(())
}

#[derive(Serialize)]
struct ImpedanceRow {
    frequency: f64,
    input: Pair,
    output: Pair,
}

/// Print terminated input and output impedance in rectangular form.
pub fn print_impedances(frequencies: &[f64], zin: &[C64], zout: &[C64], json: bool) -> Result<()> {
    if json {
        let rows: Vec<ImpedanceRow> = frequencies
            .iter()
            .zip(zin.iter().zip(zout))
            .map(|(&frequency, (&zin, &zout))| ImpedanceRow {
                frequency,
                input: pair(zin),
                output: pair(zout),
            })
            .collect();
        return print_json(&rows);
    }

    println!("{:>14} {:>26} {:>26}", "freq", "Zin (Ω)", "Zout (Ω)");
    for (f, (&zin, &zout)) in frequencies.iter().zip(zin.iter().zip(zout)) {
        println!("{:>14.6e} {} {}", f, rect(zin), rect(zout));
    }
    Ok(())
}

#[derive(Serialize)]
struct MatrixDump {
    frequency: f64,
    omega: f64,
    /// Row-major, node 1 first.
    rows: Vec<Vec<Pair>>,
}

/// Print one admittance matrix, rows and columns numbered by node.
pub fn print_matrix(y: &NodeAdmittanceMatrix, json: bool) -> Result<()> {
    let m = y.as_matrix();
    if json {
        let rows = m
            .row_iter()
            .map(|row| row.iter().map(|&v| pair(v)).collect())
            .collect();
        return print_json(&MatrixDump {
            frequency: y.frequency(),
            omega: y.omega(),
            rows,
        });
    }

    println!("f = {:e}, ω = {:e} rad/s", y.frequency(), y.omega());
    for (i, row) in m.row_iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|&v| rect(v)).collect();
        println!("{:>4}: {}", i + 1, cells.join("  "));
    }
    println!();
    Ok(())
}
