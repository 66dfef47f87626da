/// Declare a bean: the struct, its lazily built [`TypeDescriptor`], its
/// [`Bean`] implementation and structural `PartialEq`/`Eq`/`Hash`.
///
/// ```ignore
/// bean! {
///   /// A named thing
///   pub struct Named in "urn:example" => "Named" extends entity: Entity {
///     pub name: Option<String> => "name" as xsd::STRING;
///     pub rank: Option<i64> => "rank" as xsd::LONG, required;
///   }
/// }
/// ```
///
/// `extends` embeds the base bean by value; its fields come first on the
/// wire. Field modifiers (`required`, `optional`) are [`FieldDescriptor`]
/// methods.
///
/// [`TypeDescriptor`]: crate::TypeDescriptor
/// [`FieldDescriptor`]: crate::FieldDescriptor
/// [`Bean`]: crate::Bean
#[macro_export]
macro_rules! bean {
  (
    $(#[$meta:meta])*
    $vis:vis struct $name:ident in $namespace:expr => $wire_name:literal
      $(extends $base_field:ident: $base:ty)?
    {
      $(
        $(#[$field_meta:meta])*
        $field_vis:vis $field:ident: $field_ty:ty => $field_wire:literal as $field_type:expr $(, $modifier:ident)*;
      )*
    }
  ) => {
    $(#[$meta])*
    #[derive(Clone, Default, Debug)]
    $vis struct $name {
      $(pub $base_field: $base,)?
      $(
        $(#[$field_meta])*
        $field_vis $field: $field_ty,
      )*
    }

    impl $crate::Bean for $name {
      fn describe() -> &'static $crate::TypeDescriptor {
        static DESCRIPTOR: $crate::__private::LazyLock<$crate::TypeDescriptor> =
          $crate::__private::LazyLock::new(|| {
            let builder =
              $crate::TypeDescriptor::register(stringify!($name), $crate::QName::from_static($namespace, $wire_name));
            $(let builder = builder.extend(<$base as $crate::Bean>::describe());)?
            builder
              $(.add_field($crate::FieldDescriptor::new(stringify!($field), $field_wire, $field_type)$(.$modifier())*))*
              .build()
          });
        &DESCRIPTOR
      }

      #[allow(unused_mut)]
      fn slots(&self) -> Vec<&dyn $crate::FieldSlot> {
        let mut slots: Vec<&dyn $crate::FieldSlot> = Vec::new();
        $(slots.extend(<$base as $crate::Bean>::slots(&self.$base_field));)?
        $(slots.push(&self.$field);)*
        slots
      }

      #[allow(unused_mut)]
      fn slots_mut(&mut self) -> Vec<&mut dyn $crate::FieldSlot> {
        let mut slots: Vec<&mut dyn $crate::FieldSlot> = Vec::new();
        $(slots.extend(<$base as $crate::Bean>::slots_mut(&mut self.$base_field));)?
        $(slots.push(&mut self.$field);)*
        slots
      }
    }

    impl PartialEq for $name {
      fn eq(&self, other: &Self) -> bool {
        $crate::semantics::bean_eq(self, other, &mut $crate::VisitGuard::new())
      }
    }

    impl Eq for $name {}

    impl ::std::hash::Hash for $name {
      fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64($crate::semantics::bean_hash(self, $crate::semantics::HASH_DEPTH));
      }
    }
  };
}
