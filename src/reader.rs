use crate::handler::ConfigHandler;
use crate::validate::PathValidator;

/// The template-reading role of a [`ConfigHandler`].
///
/// Everything it does comes from [`PathValidator`]: the path checks,
/// [`read_config_file`](PathValidator::read_config_file) and
/// [`read_template_file`](PathValidator::read_template_file).
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    handler: &'a ConfigHandler,
}

impl<'a> Reader<'a> {
    pub fn new(handler: &'a ConfigHandler) -> Self {
        Self { handler }
    }
}

impl PathValidator for Reader<'_> {
    fn handler(&self) -> &ConfigHandler {
        self.handler
    }
}
