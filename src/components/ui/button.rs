use icons::X;
use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-md text-sm font-medium transition-all disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg:not([class*='size-'])]:size-4 shrink-0 [&_svg]:shrink-0 outline-none focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-[3px] w-fit hover:cursor-pointer touch-manipulation select-none",
        variants: {
            variant: {
                Ghost: "hover:bg-accent hover:text-accent-foreground dark:hover:bg-accent/50",
            },
            size: {
                Default: "h-9 px-4 py-2 has-[>svg]:px-3",
                Icon: "size-9",
            }
        },
        component: {
            element: button
        }
    }
}

/// Deletes its row right away. Kept out of the tab order so Tab moves
/// between fields only, and hidden on the trailing new-item row.
#[component]
pub fn RemoveItemButton(
    #[prop(into)] hidden: Signal<bool>,
    on_remove: Callback<()>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    view! {
        <Button
            class=class
            attr:data-name="RemoveItemButton"
            attr:r#type="button"
            attr:tabindex="-1"
            attr:aria-label="Remove item"
            attr:hidden=move || hidden.get()
            variant=ButtonVariant::Ghost
            size=ButtonSize::Icon
            on:click=move |_| on_remove.run(())
        >
            <X />
        </Button>
    }
}
