//! Cosmetic color tables
//!
//! Pure pickers over an injected RNG so consumers that paint agents can stay
//! deterministic under a seeded generator. Nothing in the engine reads these
//! colors; they exist solely for the visualization layer.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::types::VehicleKind;

/// A packed 0xRRGGBB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u32);

const CAR_COLORS: [Rgb; 10] = [
    Rgb(0xff0000),
    Rgb(0x0000ff),
    Rgb(0x00ff00),
    Rgb(0xffff00),
    Rgb(0xff00ff),
    Rgb(0x00ffff),
    Rgb(0xffffff),
    Rgb(0x000000),
    Rgb(0x808080),
    Rgb(0xffa500),
];

const TAXI_YELLOW: Rgb = Rgb(0xffcc00);
const BUS_BLUE: Rgb = Rgb(0x4169e1);

const CLOTHING_COLORS: [Rgb; 10] = [
    Rgb(0xff6b6b),
    Rgb(0x4ecdc4),
    Rgb(0x45b7d1),
    Rgb(0xf9ca24),
    Rgb(0x6c5ce7),
    Rgb(0xa29bfe),
    Rgb(0xfd79a8),
    Rgb(0x00b894),
    Rgb(0x0984e3),
    Rgb(0xe17055),
];

const SKIN_COLORS: [Rgb; 7] = [
    Rgb(0xffc9a0),
    Rgb(0xffb380),
    Rgb(0xff9d60),
    Rgb(0xff8740),
    Rgb(0xd4a574),
    Rgb(0xc68b59),
    Rgb(0x8d5524),
];

const TROUSER_COLORS: [Rgb; 6] = [
    Rgb(0x2c3e50),
    Rgb(0x34495e),
    Rgb(0x1e272e),
    Rgb(0x3c6382),
    Rgb(0x4a4a4a),
    Rgb(0x7f8c8d),
];

/// Body color for a vehicle kind; taxis and buses use fixed liveries
pub fn vehicle_color<R: Rng + ?Sized>(kind: VehicleKind, rng: &mut R) -> Rgb {
    match kind {
        VehicleKind::Taxi => TAXI_YELLOW,
        VehicleKind::Bus => BUS_BLUE,
        VehicleKind::Car | VehicleKind::Truck => {
            CAR_COLORS.choose(rng).copied().unwrap_or(CAR_COLORS[0])
        }
    }
}

pub fn clothing_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    CLOTHING_COLORS
        .choose(rng)
        .copied()
        .unwrap_or(CLOTHING_COLORS[0])
}

pub fn skin_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    SKIN_COLORS.choose(rng).copied().unwrap_or(SKIN_COLORS[0])
}

pub fn trouser_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    TROUSER_COLORS
        .choose(rng)
        .copied()
        .unwrap_or(TROUSER_COLORS[0])
}
