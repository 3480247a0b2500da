#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::commands::HostCommand;
    use crate::config::GameConfig;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::ScheduleEvent;
    use crate::level::{LevelData, WaveDefinition, WaveSelector};
    use crate::state::ArenaSnapshot;
    use crate::types::{Obstacle, Position, SimTime};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GameConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.enemies.spawn_interval, DEFAULT_SPAWN_INTERVAL_SECS);
        assert_eq!(config.enemies.max_simultaneous, DEFAULT_MAX_SIMULTANEOUS);
        assert_eq!(config.enemies.default_type, DEFAULT_ARCHETYPE);
        assert!(config.enemies.archetypes.contains_key("grunt"));
        assert!(config.enemies.archetypes.contains_key("ranger"));
        assert!(config.objectives.types.contains_key("elimination"));
    }

    #[test]
    fn test_partial_config_overrides_only_named_fields() {
        let json = r#"{
            "enemies": {
                "spawnInterval": 2.5,
                "maxSimultaneous": 4,
                "archetypes": { "brute": { "speed": 3, "health": 20 } }
            }
        }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.enemies.spawn_interval, 2.5);
        assert_eq!(config.enemies.max_simultaneous, 4);
        assert_eq!(config.enemies.default_type, DEFAULT_ARCHETYPE);
        assert_eq!(config.enemies.archetypes.len(), 1);
        let brute = &config.enemies.archetypes["brute"];
        assert_eq!(brute.speed, 3.0);
        assert_eq!(brute.health, 20.0);
        assert_eq!(config.movement.max_speed, PLAYER_MAX_SPEED);
    }

    #[test]
    fn test_archetype_profile_falls_back_to_default_type() {
        let config = GameConfig::default();
        let profile = config.enemies.profile("does-not-exist").unwrap();
        assert_eq!(profile, &config.enemies.archetypes["grunt"]);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_level_file_is_io_error() {
        let err = LevelData::from_path("/definitely/not/here/level.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("level.json"));
    }

    #[test]
    fn test_level_parses_training_ground() {
        let json = r#"{
            "name": "trainingGround",
            "playerStart": [0, 1.6, 12],
            "enemySpawnPoints": [[-20, 0, -20], [20, 0, -20]],
            "obstacles": [{ "position": [0, 1, 0], "size": [4, 2, 2] }],
            "waves": [
                { "count": 3, "spawnInterval": 2, "types": ["grunt"] },
                { "count": 5, "intermission": 6 }
            ],
            "enemyTypes": ["grunt", "ranger"],
            "objectives": [
                { "id": "clear", "type": "elimination", "waves": "all" },
                { "type": "survival", "waves": [2], "durationSeconds": 30 }
            ]
        }"#;
        let level = LevelData::from_json_str(json).unwrap();
        assert_eq!(level.name, "trainingGround");
        assert_eq!(level.player_start, Vec3::new(0.0, 1.6, 12.0));
        assert_eq!(level.enemy_spawn_points.len(), 2);
        assert_eq!(level.waves[0].spawn_interval, Some(2.0));
        assert_eq!(level.waves[1].intermission, Some(6.0));
        assert_eq!(level.enemy_types, vec!["grunt", "ranger"]);

        let objectives = level.objectives.unwrap();
        assert_eq!(objectives[0].kind, ObjectiveKind::Elimination);
        assert_eq!(objectives[0].waves, WaveSelector::all());
        assert_eq!(objectives[1].waves, WaveSelector::List(vec![2]));
        assert_eq!(objectives[1].duration_seconds, Some(30.0));

        let bounds = LevelData::from_json_str(json).unwrap().obstacle_bounds();
        assert_eq!(bounds[0].min, Vec3::new(-2.0, 0.0, -1.0));
        assert_eq!(bounds[0].max, Vec3::new(2.0, 2.0, 1.0));
    }

    #[test]
    fn test_empty_level_defaults() {
        let level = LevelData::from_json_str("{}").unwrap();
        assert_eq!(level.name, UNKNOWN_LEVEL);
        assert!(level.waves.is_empty());
        assert!(level.objectives.is_none());
    }

    #[test]
    fn test_untyped_objective_entry_still_loads() {
        let json = r#"{"name":"yard","waves":[{"count":1}],"objectives":[{"id":"a","waves":"all"}]}"#;
        let level = LevelData::from_json_str(json).unwrap();
        let objectives = level.objectives.unwrap();
        assert_eq!(objectives[0].kind, ObjectiveKind::Custom(String::new()));
        assert_eq!(objectives[0].waves, WaveSelector::all());
    }

    #[test]
    fn test_movement_max_step() {
        let config = GameConfig::from_json_str(r#"{"movement":{"maxSpeed":10}}"#).unwrap();
        assert_eq!(config.movement.max_step(0.5), 5.0);

        let config = GameConfig::from_json_str(r#"{"movement":{"maxSpeed":-1}}"#).unwrap();
        assert_eq!(config.movement.max_step(1.0), PLAYER_MAX_SPEED, "non-positive speed uses the default");
    }

    #[test]
    fn test_wave_definition_fallbacks() {
        let wave = WaveDefinition::new(3);
        assert_eq!(wave.spawn_interval_or(4.0), 4.0);
        assert_eq!(wave.intermission_or(0.0), 0.0);
        assert!(wave.allowed_types().is_none());

        let wave = WaveDefinition::new(3)
            .with_spawn_interval(0.0)
            .with_intermission(5.0)
            .with_types(Vec::<String>::new());
        assert_eq!(wave.spawn_interval_or(4.0), 4.0, "non-positive interval is ignored");
        assert_eq!(wave.intermission_or(0.0), 5.0);
        assert!(wave.allowed_types().is_none(), "empty allow-list means no restriction");
    }

    #[test]
    fn test_wave_selector_expansion() {
        assert_eq!(WaveSelector::all().expand(3), vec![1, 2, 3]);
        assert_eq!(WaveSelector::all().expand(0), Vec::<u32>::new());
        assert_eq!(WaveSelector::List(vec![2, 4]).expand(3), vec![2, 4]);
        assert!(WaveSelector::Keyword("some".into()).expand(3).is_empty());
    }

    #[test]
    fn test_objective_kind_serde() {
        let kinds = vec![
            ObjectiveKind::Elimination,
            ObjectiveKind::Survival,
            ObjectiveKind::Defend,
            ObjectiveKind::Custom("escort".into()),
        ];
        for kind in kinds {
            let json = serde_json::to_string(&kind).unwrap();
            let back: ObjectiveKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, back);
        }
        assert_eq!(
            serde_json::to_string(&ObjectiveKind::Defend).unwrap(),
            "\"defend\""
        );
    }

    #[test]
    fn test_obstacle_horizontal_containment() {
        let obstacle = Obstacle::new(Vec3::new(2.0, 0.0, -1.0), Vec3::new(4.0, 2.0, 1.0));
        assert!(obstacle.contains_horizontal(Vec3::new(3.0, 0.0, 0.0), 0.0));
        assert!(obstacle.contains_horizontal(Vec3::new(1.0, 0.0, 0.0), 1.0), "inclusive padded edge");
        assert!(!obstacle.contains_horizontal(Vec3::new(0.9, 0.0, 0.0), 1.0));
        // Elevation never matters.
        assert!(obstacle.contains_horizontal(Vec3::new(3.0, 100.0, 0.0), 0.0));
    }

    #[test]
    fn test_position_horizontal_distance_ignores_height() {
        let pos = Position::new(0.0, 5.0, 0.0);
        assert!((pos.horizontal_distance_to(Vec3::new(3.0, -10.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..TICK_RATE {
            time.advance(DT);
        }
        assert_eq!(time.tick, u64::from(TICK_RATE));
        assert!((time.elapsed_secs - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_host_command_serde() {
        let commands = vec![
            HostCommand::MovePlayer {
                delta: Vec3::new(1.0, 0.0, -1.0),
            },
            HostCommand::DamageUnit {
                unit_id: 3,
                amount: 2.0,
            },
            HostCommand::PlayerDown,
            HostCommand::Pause,
            HostCommand::Resume,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: HostCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_schedule_event_tagged() {
        let event = ScheduleEvent::Intermission {
            next_wave: 2,
            total_waves: 3,
            time_remaining: 1.5,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"Intermission\""));
        let back: ScheduleEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snapshot = ArenaSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: ArenaSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::Loading);
        assert_eq!(back.wave.phase, WavePhase::NotStarted);
    }
}
