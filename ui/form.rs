use html::{component, html};

#[component]
pub fn Form(action: Option<String>, id: Option<String>, post: Option<bool>) {
	html! {
		<form
			action={action}
			class="form"
			id={id}
			method={post.and_then(|post| if post { Some("post".to_owned()) } else { None })}
		>
			{children}
		</form>
	}
}

#[component]
pub fn FieldLabel(html_for: Option<String>) {
	html! {
		<label class="field-label" for={html_for}>
			{children}
		</label>
	}
}

#[component]
pub fn TextField(
	label: Option<String>,
	name: Option<String>,
	placeholder: Option<String>,
	required: Option<bool>,
	value: Option<String>,
) {
	html! {
		<FieldLabel html_for={None}>
			{label}
			<input
				class="form-text-field"
				name={name}
				placeholder={placeholder}
				required={required}
				spellcheck={false}
				value={value}
			/>
		</FieldLabel>
	}
}

#[component]
pub fn HiddenField(name: String, value: String) {
	html! {
		<input name={name} type="hidden" value={value} />
	}
}
