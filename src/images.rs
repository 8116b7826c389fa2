//! Deferred image sources for `img[loading="lazy"]`.

pub const LAZY_SELECTOR: &str = "img[loading=\"lazy\"]";
pub const LAZY_CLASS: &str = "lazy";

/// Attribute access the loader needs; the DOM and tests both implement it.
pub trait LazyImageHost<E> {
    fn attribute(&self, image: &E, name: &str) -> Option<String>;
    fn set_attribute(&self, image: &E, name: &str, value: &str);
    fn remove_class(&self, image: &E, class: &str);
}

/// Copies `data-src`/`data-srcset` into place and drops the `lazy` class.
/// Empty deferred values are ignored.
pub fn load_lazy_image<E, H>(image: &E, host: &H)
where
    H: LazyImageHost<E>,
{
    for (deferred, live) in [("data-src", "src"), ("data-srcset", "srcset")] {
        if let Some(value) = host.attribute(image, deferred).filter(|value| !value.is_empty()) {
            host.set_attribute(image, live, &value);
        }
    }
    host.remove_class(image, LAZY_CLASS);
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct FakeImage {
        attributes: RefCell<HashMap<String, String>>,
        classes: RefCell<Vec<String>>,
    }

    impl FakeImage {
        fn with(attributes: &[(&str, &str)]) -> Self {
            let image = Self::default();
            for (name, value) in attributes {
                image
                    .attributes
                    .borrow_mut()
                    .insert((*name).to_string(), (*value).to_string());
            }
            image.classes.borrow_mut().push(LAZY_CLASS.to_string());
            image
        }

        fn get(&self, name: &str) -> Option<String> {
            self.attributes.borrow().get(name).cloned()
        }
    }

    struct Host;

    impl LazyImageHost<FakeImage> for Host {
        fn attribute(&self, image: &FakeImage, name: &str) -> Option<String> {
            image.get(name)
        }

        fn set_attribute(&self, image: &FakeImage, name: &str, value: &str) {
            image
                .attributes
                .borrow_mut()
                .insert(name.to_string(), value.to_string());
        }

        fn remove_class(&self, image: &FakeImage, class: &str) {
            image.classes.borrow_mut().retain(|existing| existing != class);
        }
    }

    #[test]
    fn deferred_sources_are_promoted() {
        let image = FakeImage::with(&[
            ("data-src", "/img/otto.webp"),
            ("data-srcset", "/img/otto@2x.webp 2x"),
        ]);

        load_lazy_image(&image, &Host);

        assert_eq!(image.get("src").as_deref(), Some("/img/otto.webp"));
        assert_eq!(image.get("srcset").as_deref(), Some("/img/otto@2x.webp 2x"));
        assert!(image.classes.borrow().is_empty());
    }

    #[test]
    fn missing_or_empty_deferred_values_leave_sources_alone() {
        let image = FakeImage::with(&[("src", "/img/placeholder.svg"), ("data-src", "")]);

        load_lazy_image(&image, &Host);

        assert_eq!(image.get("src").as_deref(), Some("/img/placeholder.svg"));
        assert_eq!(image.get("srcset"), None);
        assert!(image.classes.borrow().is_empty());
    }
}
