use crate::models::Action;

/// The form half of the widget: input fields, file picker and preview.
pub trait FormView {
    fn clear_text_input(&self);

    /// Clears the image question field and the file picker.
    fn clear_image_form(&self);

    fn show_preview(&self, data_url: &str);

    fn hide_preview(&self);

    /// Called when an action kind enters or leaves flight.
    fn set_busy(&self, _action: Action, _busy: bool) {}
}

impl<V: FormView + ?Sized> FormView for &V {
    fn clear_text_input(&self) {
        (**self).clear_text_input();
    }

    fn clear_image_form(&self) {
        (**self).clear_image_form();
    }

    fn show_preview(&self, data_url: &str) {
        (**self).show_preview(data_url);
    }

    fn hide_preview(&self) {
        (**self).hide_preview();
    }

    fn set_busy(&self, action: Action, busy: bool) {
        (**self).set_busy(action, busy);
    }
}
