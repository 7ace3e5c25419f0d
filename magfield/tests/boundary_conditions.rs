//! Boundary condition tests for magfield.
//!
//! Exercises queries at the edges of the stored grid, at wedge and sector
//! boundaries, on the z axis and at non-finite coordinates, plus maps loaded
//! from files declared in non-canonical units.

use magfield::{
    ByteOrder, CoreError, FieldMap, FieldMapBuilder, FieldVector, Interpolation, MagError,
    MapConfig, Point3, Topology,
};
use magfield_io::{AngleUnit, AxisSpec, FieldMapHeader, FieldUnit, LengthUnit, MapUnits};

// =============================================================================
// Test Map Factories
// =============================================================================

/// Solenoid with Bz = ρ + z, so every grid value is distinct
fn create_linear_solenoid(mode: Interpolation) -> FieldMap {
    FieldMapBuilder::solenoid((0.0, 100.0, 11), (-50.0, 50.0, 11))
        .fill_fn(|c| FieldVector::new(0.0, 0.0, (c.rho + c.z) as f32))
        .with_config(MapConfig::default().with_interpolation(mode))
        .build()
        .unwrap()
}

/// 30° wedge holding a unit azimuthal field
fn create_azimuthal_wedge() -> FieldMap {
    FieldMapBuilder::toroid((0.0, 30.0, 7), (50.0, 450.0, 9), (-400.0, 400.0, 9))
        .fill_fn(|_| FieldVector::new(1.0, 0.0, 0.0))
        .build()
        .unwrap()
}

/// 30° wedge with a six-fold field that is continuous across sector edges
fn create_sector_wedge() -> FieldMap {
    FieldMapBuilder::toroid((0.0, 30.0, 61), (50.0, 450.0, 41), (-400.0, 400.0, 41))
        .fill_fn(|c| {
            let (s, co) = (6.0 * c.phi).to_radians().sin_cos();
            FieldVector::new((2.0 + co) as f32, (0.5 * s) as f32, (s * c.z / 400.0) as f32)
        })
        .with_config(MapConfig::default().with_interpolation(Interpolation::Linear))
        .build()
        .unwrap()
}

fn at_angle(phi_deg: f64, rho: f64, z: f64) -> Point3 {
    let (s, c) = phi_deg.to_radians().sin_cos();
    Point3::new(rho * c, rho * s, z)
}

fn assert_close(actual: FieldVector, expected: [f64; 3], tol: f64) {
    let got = [actual.b1 as f64, actual.b2 as f64, actual.b3 as f64];
    for (g, e) in got.iter().zip(&expected) {
        assert!((g - e).abs() < tol, "got {:?}, expected {:?}", got, expected);
    }
}

// =============================================================================
// Grid Extents
// =============================================================================

#[test]
fn test_exact_axis_extents() {
    for mode in [Interpolation::NearestNeighbor, Interpolation::Linear] {
        let map = create_linear_solenoid(mode);

        assert_eq!(map.field_at(Point3::new(100.0, 0.0, 50.0)).b3, 150.0);
        assert_eq!(map.field_at(Point3::new(0.0, 0.0, -50.0)).b3, -50.0);
        assert_eq!(map.field_at(Point3::new(100.0, 0.0, -50.0)).b3, 50.0);
        assert_eq!(map.field_at(Point3::new(0.0, 0.0, 50.0)).b3, 50.0);
    }
}

#[test]
fn test_just_outside_extents_is_zero() {
    let map = create_linear_solenoid(Interpolation::Linear);

    assert_eq!(map.field_at(Point3::new(100.001, 0.0, 0.0)), FieldVector::ZERO);
    assert_eq!(map.field_at(Point3::new(0.0, -100.001, 0.0)), FieldVector::ZERO);
    assert_eq!(map.field_at(Point3::new(10.0, 0.0, 50.001)), FieldVector::ZERO);
    assert_eq!(map.field_at(Point3::new(10.0, 0.0, -50.001)), FieldVector::ZERO);
}

#[test]
fn test_repeated_queries_at_max_edge() {
    let map = create_linear_solenoid(Interpolation::Linear);
    let mut probe = map.probe();

    // The max edge sits outside the half-open cell, so each query reloads
    // the same last cell and gets the same answer
    let first = probe.field(Point3::new(0.0, 100.0, 50.0));
    let second = probe.field(Point3::new(0.0, 100.0, 50.0));
    assert_eq!(first, second);
    assert!((first.b3 - 150.0).abs() < 1e-4);

    // Stepping back inside reuses the cell
    let refreshes = probe.refreshes();
    probe.field(Point3::new(0.0, 95.0, 45.0));
    assert_eq!(probe.refreshes(), refreshes);
}

#[test]
fn test_field_is_zero_exactly_where_map_does_not_contain_point() {
    let map = FieldMapBuilder::solenoid((10.0, 100.0, 10), (-50.0, 50.0, 11))
        .fill_fn(|_| FieldVector::new(0.0, 0.0, 1.0))
        .build()
        .unwrap();

    for ix in -30..=30 {
        for iz in -15..=15 {
            let p = Point3::new(ix as f64 * 4.1, 7.0, iz as f64 * 4.1);
            let b = map.field_at(p);
            if map.contains_cartesian(p) {
                assert_eq!(b.b3, 1.0, "inside at {:?}", p);
            } else {
                assert_eq!(b, FieldVector::ZERO, "outside at {:?}", p);
            }
        }
    }
}

// =============================================================================
// Wedge and Sector Boundaries
// =============================================================================

#[test]
fn test_azimuthal_field_at_sector_boundaries() {
    let map = create_azimuthal_wedge();

    // The wedge edges (0°, 30°) and every mirror or sector boundary after them
    for k in 0..12 {
        let phi = 30.0 * k as f64;
        let (s, c) = phi.to_radians().sin_cos();
        assert_close(map.field_at(at_angle(phi, 200.0, 0.0)), [-s, c, 0.0], 1e-5);
    }
}

#[test]
fn test_azimuthal_field_just_below_full_circle() {
    let map = create_azimuthal_wedge();
    let phi: f64 = 359.999;
    let (s, c) = phi.to_radians().sin_cos();
    assert_close(map.field_at(at_angle(phi, 200.0, 100.0)), [-s, c, 0.0], 1e-5);
}

#[test]
fn test_field_continuous_across_sector_edges() {
    let map = create_sector_wedge();
    let eps = 1e-7;

    // Mirror planes inside a sector (60k) and edges between sectors (60k + 30)
    for k in 0..12 {
        let phi = 30.0 * k as f64;
        let below_phi = if k == 0 { 360.0 - eps } else { phi - eps };
        for z in [-300.0, 0.0, 250.0] {
            let below = map.field_at(at_angle(below_phi, 200.0, z));
            let above = map.field_at(at_angle(phi + eps, 200.0, z));
            assert!(
                (below - above).magnitude() < 1e-4,
                "discontinuity at phi={} z={}: {:?} vs {:?}",
                phi,
                z,
                below,
                above
            );
        }
    }
}

#[test]
fn test_mirror_flips_radial_and_axial_components() {
    let map = create_sector_wedge();

    // φ and -φ are mirror images about the 0° mid-plane
    let phi: f64 = 12.5;
    let b = map.field_at(at_angle(phi, 300.0, 120.0));
    let m = map.field_at(at_angle(-phi, 300.0, 120.0));

    let to_cyl = |v: FieldVector, deg: f64| {
        let (s, c) = deg.to_radians().sin_cos();
        let (bx, by) = (v.b1 as f64, v.b2 as f64);
        (bx * c + by * s, -bx * s + by * c, v.b3 as f64)
    };
    let (b_rho, b_phi, b_z) = to_cyl(b, phi);
    let (m_rho, m_phi, m_z) = to_cyl(m, -phi);

    assert!((b_phi - m_phi).abs() < 1e-5);
    assert!((b_rho + m_rho).abs() < 1e-5);
    assert!((b_z + m_z).abs() < 1e-5);
    assert!(b_rho.abs() > 0.1);
}

#[test]
fn test_wedge_edge_from_radians_reaches_stored_samples() {
    // π/6 in f32 is a hair off 30°; queries at the mirror edge must still
    // find the last φ plane
    let mut header = FieldMapHeader::new([
        AxisSpec::new(0.0, std::f32::consts::FRAC_PI_6, 4),
        AxisSpec::new(50.0, 450.0, 5),
        AxisSpec::new(-400.0, 400.0, 5),
    ]);
    MapUnits {
        angle: AngleUnit::Radian,
        ..MapUnits::default()
    }
    .apply_to(&mut header);
    let samples = vec![FieldVector::new(1.0, 0.0, 0.0); 100];
    let bytes = magfield_io::encode(&header, &samples, ByteOrder::Big).unwrap();
    let map = FieldMap::decode(&bytes).unwrap();

    let b = map.field_at(at_angle(30.0, 200.0, 0.0));
    assert!((b.magnitude() - 1.0).abs() < 1e-5);
}

#[test]
fn test_wedge_with_minimum_just_off_zero_reaches_samples() {
    // f32 wedge edges written by other tools rarely land on exactly 0°
    let map = FieldMapBuilder::toroid((5e-5, 30.0, 7), (10.0, 20.0, 3), (0.0, 10.0, 3))
        .fill_fn(|_| FieldVector::new(1.0, 0.0, 0.0))
        .build()
        .unwrap();
    assert!(map.symmetry().is_some());

    for phi in [0.0, -1e-5, 1e-5, 60.0, 180.0, 300.0] {
        let b = map.field_at(at_angle(phi, 15.0, 5.0));
        assert!((b.magnitude() - 1.0).abs() < 1e-5, "phi={}: {:?}", phi, b);
    }
    assert_close(map.field_at(at_angle(0.0, 15.0, 5.0)), [0.0, 1.0, 0.0], 1e-5);
}

// =============================================================================
// Full Circle Seam
// =============================================================================

/// Full toroid stored on [0, 355]; the 355° to 360° cell wraps onto plane 0
fn create_seam_toroid(mode: Interpolation, bz: fn(f64) -> f64) -> FieldMap {
    FieldMapBuilder::toroid((0.0, 355.0, 72), (10.0, 20.0, 3), (0.0, 10.0, 3))
        .fill_fn(move |c| FieldVector::new(0.0, 0.0, bz(c.phi) as f32))
        .with_config(MapConfig::default().with_interpolation(mode))
        .build()
        .unwrap()
}

#[test]
fn test_seam_nearest_picks_closest_plane() {
    let map = create_seam_toroid(Interpolation::NearestNeighbor, |phi| phi);
    assert!(map.symmetry().is_none());

    let bz = |phi: f64| map.field_at(at_angle(phi, 15.0, 5.0)).b3;
    assert_eq!(bz(355.0), 355.0);
    assert_eq!(bz(357.0), 355.0);
    assert_eq!(bz(359.0), 0.0);
    assert_eq!(bz(-1.0), 0.0);
    assert_eq!(bz(0.0), 0.0);
    assert_eq!(bz(3.0), 5.0);
}

#[test]
fn test_seam_linear_blends_last_and_first_planes() {
    let map = create_seam_toroid(Interpolation::Linear, |phi| phi.to_radians().cos());
    let expected = (1.0 + 355f64.to_radians().cos()) / 2.0;

    for phi in [357.5, -2.5] {
        let b = map.field_at(at_angle(phi, 15.0, 5.0));
        assert!((b.b3 as f64 - expected).abs() < 1e-5, "phi={}: {}", phi, b.b3);
    }

    // both sides of each seam edge agree
    let below = map.field_at(at_angle(355.0 - 1e-6, 15.0, 5.0)).b3;
    let above = map.field_at(at_angle(355.0 + 1e-6, 15.0, 5.0)).b3;
    assert!((below - above).abs() < 1e-5);
    let below = map.field_at(at_angle(-1e-6, 15.0, 5.0)).b3;
    let above = map.field_at(at_angle(1e-6, 15.0, 5.0)).b3;
    assert!((below - above).abs() < 1e-5);
}

#[test]
fn test_seam_cell_is_cached() {
    let map = create_seam_toroid(Interpolation::Linear, |phi| phi.to_radians().cos());
    let mut probe = map.probe();
    for phi in [355.5, 356.0, 358.0, 359.9] {
        probe.field(at_angle(phi, 12.5, 2.5));
    }
    assert_eq!(probe.refreshes(), 1);

    probe.field(at_angle(0.5, 12.5, 2.5));
    assert_eq!(probe.refreshes(), 2);
}

// =============================================================================
// Axis and Degenerate Geometry
// =============================================================================

#[test]
fn test_query_on_z_axis() {
    let map = FieldMapBuilder::solenoid((0.0, 200.0, 101), (-300.0, 300.0, 301))
        .fill_fn(|c| {
            FieldVector::new(0.0, (c.rho * c.z / 1e4) as f32, (20.0 - c.rho / 50.0) as f32)
        })
        .build()
        .unwrap();

    let b = map.field_at(Point3::new(0.0, 0.0, 100.0));
    assert_eq!(b, FieldVector::new(0.0, 0.0, 20.0));
}

#[test]
fn test_toroid_with_inner_radius_excludes_axis() {
    let map = create_azimuthal_wedge();
    assert_eq!(map.field_at(Point3::new(0.0, 0.0, 0.0)), FieldVector::ZERO);
    assert_eq!(map.field_at(at_angle(45.0, 49.9, 0.0)), FieldVector::ZERO);
}

#[test]
fn test_degenerate_phi_at_nonzero_angle_is_solenoid() {
    let map = FieldMapBuilder::toroid((45.0, 45.0, 1), (0.0, 100.0, 11), (-10.0, 10.0, 3))
        .fill_fn(|_| FieldVector::new(0.0, 1.0, 0.0))
        .build()
        .unwrap();

    assert_eq!(map.topology(), Topology::Solenoid);
    assert!(map.symmetry().is_none());

    // Bρ = 1 points away from the axis at every azimuth
    for phi in [0.0, 45.0, 170.0, 300.0] {
        let (s, c) = f64::to_radians(phi).sin_cos();
        assert_close(map.field_at(at_angle(phi, 50.0, 0.0)), [c, s, 0.0], 1e-6);
    }
}

#[test]
fn test_non_finite_points_are_zero() {
    let solenoid = create_linear_solenoid(Interpolation::Linear);
    let wedge = create_sector_wedge();

    let points = [
        Point3::new(f64::NAN, 0.0, 0.0),
        Point3::new(0.0, f64::NAN, 0.0),
        Point3::new(10.0, 10.0, f64::NAN),
        Point3::new(f64::INFINITY, 0.0, 0.0),
        Point3::new(0.0, f64::NEG_INFINITY, 0.0),
        Point3::new(10.0, 0.0, f64::INFINITY),
    ];
    for map in [&solenoid, &wedge] {
        let mut probe = map.probe();
        for p in points {
            assert_eq!(probe.field(p), FieldVector::ZERO, "{:?}", p);
            assert!(!map.contains_cartesian(p));
        }
        assert_eq!(probe.refreshes(), 0);
    }
}

// =============================================================================
// Shift
// =============================================================================

#[test]
fn test_shift_moves_grid_edges() {
    let map = create_linear_solenoid(Interpolation::Linear)
        .with_config(MapConfig::default().with_shift([10.0, 0.0, 100.0]));

    assert_eq!(map.field_at(Point3::new(10.0, 0.0, 150.0)).b3, 50.0);
    assert_eq!(map.field_at(Point3::new(10.0, 0.0, 150.001)), FieldVector::ZERO);
    assert_eq!(map.field_at(Point3::new(10.0, 0.0, 50.0)).b3, -50.0);
    assert_eq!(map.field_at(Point3::new(110.0, 0.0, 100.0)).b3, 100.0);
    assert_eq!(map.field_at(Point3::new(-90.0, 0.0, 100.0)).b3, 100.0);
    assert_eq!(map.field_at(Point3::new(110.001, 0.0, 100.0)), FieldVector::ZERO);
}

// =============================================================================
// Files in Other Units
// =============================================================================

fn write_map(
    dir: &std::path::Path,
    name: &str,
    header: &FieldMapHeader,
    samples: &[FieldVector],
) -> std::path::PathBuf {
    let path = dir.join(name);
    magfield_io::save_to_file(&path, header, samples, ByteOrder::Little).unwrap();
    path
}

#[test]
fn test_metre_tesla_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut header = FieldMapHeader::new([
        AxisSpec::new(0.0, 0.0, 1),
        AxisSpec::new(0.0, 1.0, 11),
        AxisSpec::new(-2.0, 2.0, 5),
    ]);
    MapUnits {
        length: LengthUnit::Meter,
        field: FieldUnit::Tesla,
        ..MapUnits::default()
    }
    .apply_to(&mut header);
    let samples = vec![FieldVector::new(0.0, 0.0, 2.0); 55];
    let path = write_map(dir.path(), "solenoid_m_T.dat", &header, &samples);

    let map = FieldMap::load_from_file(&path).unwrap();
    assert_eq!(map.source(), Some(path.as_path()));
    assert!((map.rho_axis().max() - 100.0).abs() < 1e-9);
    assert!((map.z_axis().min() + 200.0).abs() < 1e-9);

    // 2 T = 20 kG, and the grid edge is now at 100 cm
    assert!((map.field_at(Point3::new(0.0, 99.0, 150.0)).b3 - 20.0).abs() < 1e-5);
    assert_eq!(map.field_at(Point3::new(0.0, 101.0, 0.0)), FieldVector::ZERO);
}

#[test]
fn test_radian_gauss_wedge_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut header = FieldMapHeader::new([
        AxisSpec::new(0.0, std::f32::consts::FRAC_PI_4, 4),
        AxisSpec::new(10.0, 20.0, 3),
        AxisSpec::new(0.0, 10.0, 3),
    ]);
    MapUnits {
        angle: AngleUnit::Radian,
        field: FieldUnit::Gauss,
        ..MapUnits::default()
    }
    .apply_to(&mut header);
    // Bφ = 5000 G everywhere
    let samples = vec![FieldVector::new(5000.0, 0.0, 0.0); 36];
    let path = write_map(dir.path(), "wedge_rad_G.dat", &header, &samples);

    let map = FieldMap::load_from_file(&path).unwrap();
    assert_eq!(map.symmetry().map(|s| s.sectors()), Some(4));
    assert!((map.phi_axis().max() - 45.0).abs() < 1e-4);

    let b = map.field_at(at_angle(200.0, 15.0, 5.0));
    let (s, c) = 200f64.to_radians().sin_cos();
    assert_close(b, [-5.0 * s, 5.0 * c, 0.0], 1e-4);
}

#[test]
fn test_wedge_that_does_not_tile_is_rejected_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let header = FieldMapHeader::new([
        AxisSpec::new(0.0, 50.0, 6),
        AxisSpec::new(10.0, 20.0, 2),
        AxisSpec::new(0.0, 10.0, 2),
    ]);
    let path = write_map(dir.path(), "bad_wedge.dat", &header, &[FieldVector::ZERO; 24]);

    match FieldMap::load_from_file(&path) {
        Err(MagError::Core(CoreError::WedgeDoesNotTile { width })) => {
            assert!((width - 50.0).abs() < 1e-9)
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_unanchored_wedge_is_rejected_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let header = FieldMapHeader::new([
        AxisSpec::new(15.0, 45.0, 4),
        AxisSpec::new(10.0, 20.0, 2),
        AxisSpec::new(0.0, 10.0, 2),
    ]);
    let path = write_map(dir.path(), "offset_wedge.dat", &header, &[FieldVector::ZERO; 16]);

    assert!(matches!(
        FieldMap::load_from_file(&path),
        Err(MagError::Core(CoreError::WedgeNotAnchored { .. }))
    ));
}
