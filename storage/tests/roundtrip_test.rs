use noise_core::sampler::{Domain, sample_grid_par2};
use noise_core::{Generator, Kernel, Modifier, ModifierKind, Preset};
use noise_storage::{Catalog, GeneratorDoc, GridDoc, StorageError, decode_config, encode_config};

#[test]
fn blob_round_trip_rebuilds_the_same_generator() {
    let g = Generator::make(1337, 1.0, 1.0, 4, 0.5, 2.0).unwrap();
    let blob = encode_config(g.config());
    let back = Generator::new(decode_config(&blob).unwrap(), Kernel::Perlin).unwrap();
    assert_eq!(back, g);
    assert_eq!(back.noise2(0.123, 0.456), g.noise2(0.123, 0.456));
}

#[test]
fn every_preset_survives_the_blob() {
    for preset in Preset::ALL {
        let config = preset.config(42);
        assert_eq!(decode_config(&encode_config(&config)).unwrap(), config);
    }
}

#[test]
fn truncated_blob_is_rejected() {
    let blob = encode_config(&Preset::Terrain.config(1));
    assert!(matches!(
        decode_config(&blob[..32]),
        Err(StorageError::Format {
            expected: 40,
            found: 32
        })
    ));
}

#[test]
fn sampled_grid_round_trip() {
    let g = Preset::Cloud
        .generator(8)
        .unwrap()
        .modified(Modifier::of(ModifierKind::Normalize));
    let view = g.in_mode(Preset::Cloud.mode());
    let grid = sample_grid_par2(&view, Domain::new([0.0, 0.0], [4.0, 2.0]), [33, 17]).unwrap();

    let json = GridDoc::from(&grid).to_json().unwrap();
    let back = GridDoc::from_json(&json).unwrap().to_grid::<2>().unwrap();
    assert_eq!(back, grid);
    assert!(back.values.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn catalog_of_presets() {
    let mut catalog = Catalog::new();
    for preset in Preset::ALL {
        catalog.create(GeneratorDoc::from_preset(preset, 2025)).unwrap();
    }
    assert_eq!(catalog.len(), 21);
    assert_eq!(catalog.read_by_seed(2025).len(), 21);

    let restored = Catalog::from_json(&catalog.to_json().unwrap()).unwrap();
    let lava = restored.build("lava").unwrap().unwrap();
    assert_eq!(lava.kernel(), Kernel::Simplex);
    assert_eq!(lava, Preset::Lava.generator(2025).unwrap());
}
