use super::*;

#[test]
fn default_config_validates() {
  assert!(GrowthConfig::default().validate().is_ok());
}

#[test]
fn rejects_non_positive_link_rest_length() {
  let config = GrowthConfig::default().with_link_rest_length(0.0);
  assert!(matches!(
    config.validate(),
    Err(GrowthError::InvalidConfig(_))
  ));
}

#[test]
fn rejects_non_positive_radius_of_influence() {
  let config = GrowthConfig::default().with_radius_of_influence(-1.0);
  assert!(matches!(
    config.validate(),
    Err(GrowthError::InvalidConfig(_))
  ));
}

#[test]
fn rejects_zero_worker_count() {
  let config = GrowthConfig::default().with_worker_count(0);
  assert!(matches!(
    config.validate(),
    Err(GrowthError::InvalidConfig(_))
  ));
}

#[test]
fn index_cell_size_scales_with_radius() {
  let config = GrowthConfig::default().with_radius_of_influence(2.0);
  assert!((config.index_cell_size() - 2.4).abs() < 1e-6);
}
